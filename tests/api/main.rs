mod contacts;
mod persistence;
