pub mod focus;
