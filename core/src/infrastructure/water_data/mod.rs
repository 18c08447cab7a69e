pub mod simplelab_client;

pub use simplelab_client::SimpleLabClient;
