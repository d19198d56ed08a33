// Dweve XMLDict - XML to Dictionary Conversion
//
// Copyright (c) 2025 Dweve IP B.V. and individual contributors.
//
// SPDX-License-Identifier: Apache-2.0
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE file at the
// root of this repository or at: http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! XML to dictionary command line converter.

use clap::Parser;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use thiserror::Error;
use xmldict_core::XmlError;

/// Convert an XML document to an indented JSON dictionary.
///
/// Reads from a file, or from standard input when the argument is `-` or
/// omitted, and prints the converted document to standard output.
#[derive(Parser)]
#[command(name = "xmltodict")]
#[command(author, version, about = "Convert XML documents to JSON dictionaries", long_about = None)]
struct Cli {
    /// Input XML file; '-' or omitted reads standard input
    file: Option<PathBuf>,
}

#[derive(Debug, Error)]
enum CliError {
    #[error("I/O error for '{path}': {message}")]
    Io { path: String, message: String },

    #[error(transparent)]
    Convert(#[from] XmlError),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

fn read_input(file: Option<&Path>) -> Result<Vec<u8>, CliError> {
    match file {
        Some(path) if path.as_os_str() != "-" => {
            std::fs::read(path).map_err(|e| CliError::Io {
                path: path.display().to_string(),
                message: e.to_string(),
            })
        }
        _ => {
            let mut buffer = Vec::new();
            std::io::stdin()
                .read_to_end(&mut buffer)
                .map_err(|e| CliError::Io {
                    path: "<stdin>".to_string(),
                    message: e.to_string(),
                })?;
            Ok(buffer)
        }
    }
}

fn run(cli: &Cli) -> Result<(), CliError> {
    let input = read_input(cli.file.as_deref())?;
    let document = xmldict_core::parse_reader(&input[..])?;
    let json = xmldict_json::to_json_pretty(&document)?;
    println!("{json}");
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
