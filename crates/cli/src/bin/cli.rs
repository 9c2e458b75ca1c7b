// -------------------------------------------------------------------------------------------------
//  Copyright (C) 2015-2025 Nautech Systems Pty Ltd. All rights reserved.
//  https://nautechsystems.io
//
//  Licensed under the GNU Lesser General Public License Version 3.0 (the "License");
//  You may not use this file except in compliance with the License.
//  You may obtain a copy of the License at https://www.gnu.org/licenses/lgpl-3.0.en.html
//
//  Unless required by applicable law or agreed to in writing, software
//  distributed under the License is distributed on an "AS IS" BASIS,
//  WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
//  See the License for the specific language governing permissions and
//  limitations under the License.
// -------------------------------------------------------------------------------------------------

use clap::Parser;
use log::LevelFilter;
use nova_cli::opt::NovaCli;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    if let Err(e) = simple_logger::SimpleLogger::new()
        .with_level(LevelFilter::Info)
        .with_module_level("reqwest", LevelFilter::Warn)
        .with_module_level("hyper_util", LevelFilter::Warn)
        .env()
        .init()
    {
        eprintln!("Failed to initialize logger: {e}");
    }

    if let Err(e) = nova_cli::run(NovaCli::parse()).await {
        log::error!("Error executing Nova CLI: {e:#}");
        std::process::exit(1);
    }
}
