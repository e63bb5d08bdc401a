pub mod bdi2;
