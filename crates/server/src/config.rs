//! Command line and environment configuration for the dashboard server.

use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::Parser;

use crate::dashboard::DEFAULT_TOP_N;

#[derive(Parser, Debug, Clone)]
#[command(name = "catalog-dashboard")]
#[command(about = "Serve the streaming catalog dashboard", long_about = None)]
pub struct ServerConfig {
    /// Path to the catalog CSV file
    #[arg(long, env = "CATALOG_DATA", default_value = "data/netflix_titles.csv")]
    pub data_file: PathBuf,

    /// Address to listen on
    #[arg(long, env = "CATALOG_BIND", default_value = "127.0.0.1:5000")]
    pub bind: SocketAddr,

    /// Number of countries and genres in the bar charts
    #[arg(long, default_value_t = DEFAULT_TOP_N)]
    pub top_n: usize,

    /// Field delimiter of the CSV file
    #[arg(long, default_value_t = ',')]
    pub delimiter: char,
}

impl ServerConfig {
    /// The delimiter as the single byte the CSV reader wants
    pub fn delimiter_byte(&self) -> Result<u8> {
        if !self.delimiter.is_ascii() {
            bail!("Delimiter must be an ASCII character, got '{}'", self.delimiter);
        }
        Ok(self.delimiter as u8)
    }
}
