pub mod dbshop;
