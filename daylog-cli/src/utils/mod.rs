pub mod date_arg;
