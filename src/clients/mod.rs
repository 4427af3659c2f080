pub mod mobygames;
