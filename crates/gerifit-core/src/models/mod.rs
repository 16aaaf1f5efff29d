pub mod assessment;
pub mod record;
