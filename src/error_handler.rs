use colored::*;
use std::fmt::Display;

pub fn show_error(error: &dyn Display)
{
    eprintln!("{} {}", "Error:".red(), error);
}
