/// Attribute names a role definition may weight
pub const KNOWN_ATTRIBUTES: &[&str] = &[
    // Technical
    "Corners",
    "Crossing",
    "Dribbling",
    "Finishing",
    "First Touch",
    "Free Kick Taking",
    "Heading",
    "Long Shots",
    "Long Throws",
    "Marking",
    "Passing",
    "Penalty Taking",
    "Tackling",
    "Technique",
    // Mental
    "Aggression",
    "Anticipation",
    "Bravery",
    "Composure",
    "Concentration",
    "Decisions",
    "Determination",
    "Flair",
    "Leadership",
    "Off the Ball",
    "Positioning",
    "Teamwork",
    "Vision",
    "Work Rate",
    // Physical
    "Acceleration",
    "Agility",
    "Balance",
    "Jumping Reach",
    "Natural Fitness",
    "Pace",
    "Stamina",
    "Strength",
    // Goalkeeping
    "Aerial Reach",
    "Command of Area",
    "Communication",
    "Eccentricity",
    "Handling",
    "Kicking",
    "One on Ones",
    "Punching (Tendency)",
    "Reflexes",
    "Rushing Out (Tendency)",
    "Throwing",
];

pub fn is_known_attribute(name: &str) -> bool {
    KNOWN_ATTRIBUTES.contains(&name)
}
