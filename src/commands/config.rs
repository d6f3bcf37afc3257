// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use rusqlite::Connection;

use crate::utils::{get_provider_token, set_provider_token};

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("set-token", sub)) => {
            let token = sub.get_one::<String>("token").unwrap();
            set_provider_token(conn, token)?;
            println!("Provider token saved");
        }
        Some(("show", _)) => match get_provider_token(conn)? {
            Some(token) => {
                let head: String = token.chars().take(6).collect();
                println!("Provider token: {}…", head);
            }
            None => println!("No provider token configured; buy classification is manual"),
        },
        _ => {}
    }
    Ok(())
}
