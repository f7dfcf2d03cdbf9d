pub mod service;

pub use service::TasksService;
