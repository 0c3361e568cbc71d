pub mod environment;
pub mod process;
pub mod wrapper;

pub use process::OsProcessService;
pub use wrapper::{wrapper_executable_name, WrapperTask};
