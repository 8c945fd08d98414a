pub mod err;

#[cfg(test)]
pub(crate) mod fixture;
