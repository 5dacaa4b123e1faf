pub mod cli;
pub mod commands;
pub mod config;
pub mod error;

pub mod core {
    pub mod chromosome;
    pub mod sv_record;
    pub mod svtype;
}

pub mod io {
    pub mod length_reader;
    pub mod readers;
    pub mod sv_reader;
    pub mod table_writer;
}

pub mod render;

pub mod utils {
    pub mod util;
}

pub mod constants;

pub use constants::*;
