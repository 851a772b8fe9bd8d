pub mod comment;
pub mod like;

pub use comment::Comment;
pub use like::Like;
