mod organization;
mod position;

pub use organization::{NewOrganization, Organization, OrganizationFilter, OrganizationPatch};
pub use position::{NewPosition, Position, PositionFilter, PositionPatch, PositionSummary};
