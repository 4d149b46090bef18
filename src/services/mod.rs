pub mod scoring;

pub use scoring::{MatrixRequest, MatrixResponse, RoleSelection, ScoringService, TopRequest, TopResponse};
