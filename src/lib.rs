pub mod alpha_beta_searcher;
pub mod evaluate;
pub mod games;
pub mod session;
pub mod side;
