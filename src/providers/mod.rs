pub mod tcmb;

pub use tcmb::TcmbProvider;
