//! A doubly linked list whose nodes are handed out as restricted handles.
//!
//! ```
//! use restricted_list::List;
//!
//! let mut list = List::new();
//! let a = list.push("a");
//! list.push("c");
//! list.append_after(a, "b").unwrap();
//!
//! let head = list.head().unwrap();
//! assert_eq!(*head.next().unwrap().data(), "b");
//! assert_eq!(list.map(|s, i| format!("{i}:{s}")), ["0:a", "1:b", "2:c"]);
//! ```
mod errors;
mod handle;
mod list;
mod node;
mod restrictor;

pub use errors::ListError;
pub use handle::{Handle, NodeRef};
pub use list::{Iter, IterHandles, List};
