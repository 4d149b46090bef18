pub mod eligibility;
pub mod settings;

pub use eligibility::{eligibility_rules, EligibilityRule, RoleCategory};
pub use settings::AppConfig;
