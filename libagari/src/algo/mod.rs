pub mod agari;
pub mod machi;
pub mod special;
