//! # Domain Services
//!
//! エンティティに属さない純粋なビジネスルール

pub mod archive_naming;
pub mod path_resolver;
