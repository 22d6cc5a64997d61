//! 电梯调度领域模型
//!
//! 乘梯请求、门禁策略、状态快照、调度结果与领域事件

pub mod access;
pub mod events;
pub mod outcomes;
pub mod value_objects;

pub use access::*;
pub use events::*;
pub use outcomes::*;
pub use value_objects::*;
