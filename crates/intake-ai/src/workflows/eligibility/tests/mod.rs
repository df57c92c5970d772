mod common;

mod summary;
