pub mod click_behavior;
pub mod deferrable;
pub mod dismiss;
