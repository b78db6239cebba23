pub mod session_page;

pub use session_page::Session;
