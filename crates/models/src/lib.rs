pub mod errors;
pub mod db;
pub mod site;

#[cfg(test)]
mod tests;
