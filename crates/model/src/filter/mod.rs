pub mod expression;
pub mod factory;
pub mod predicate;
