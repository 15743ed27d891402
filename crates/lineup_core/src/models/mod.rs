pub mod attributes;
pub mod player;

pub use attributes::{Attribute, LooseAttributeMap, PlayerAttributes, ATTRIBUTE_MAX};
pub use player::{Player, RoleCategory};
