pub mod catalog;
pub mod characters;
pub mod genres;
pub mod proxy;
pub mod reader;

use serde_derive::Deserialize;

#[derive(Deserialize, Debug, Default)]
pub struct PageParams {
    pub page: Option<u32>,
}

impl PageParams {
    pub fn page(&self) -> u32 {
        self.page.unwrap_or(1).max(1)
    }
}
