//! 电梯调度核心
//!
//! 为每个乘梯请求挑选最合适的空闲电梯，并在共享的工作池中异步执行乘梯；
//! 负责整个系统的有序关闭。

pub mod dispatcher;
pub mod pool;
pub mod strategies;


pub use dispatcher::{Dispatcher, ShutdownReport};
pub use pool::{Job, WorkerPool};
pub use strategies::{NearestIdleStrategy, SelectionStrategy};
