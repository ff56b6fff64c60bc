pub mod a001_post;
pub mod a002_category;
pub mod a003_comment;
