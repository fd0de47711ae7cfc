pub mod config;
pub mod descriptor;
pub mod template;
pub mod topic;
pub mod topology;
pub mod unit;

pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

pub trait Builder {
    type Output;
    fn build(self) -> Result<Self::Output>;
}
