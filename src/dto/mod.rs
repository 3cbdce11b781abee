pub mod activities;
