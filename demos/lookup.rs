//! Look up a postcode from the command line.
//!
//! ```text
//! GETADDRESS_API_KEY=... cargo run --example lookup -- "NR10 4JJ" Bank
//! ```

use getaddress_client::{Client, Error};

#[tokio::main]
async fn main() -> Result<(), Error> {
    let mut args = std::env::args().skip(1);
    let postcode = args.next().unwrap_or_else(|| "NR10 4JJ".to_string());
    let house = args.next();

    let client = Client::from_env()?;

    match client.lookup(&postcode, house.as_deref()).await {
        Ok(response) => {
            println!(
                "{postcode}: {} addresses at ({}, {})",
                response.addresses().len(),
                response.latitude(),
                response.longitude()
            );
            for address in response.addresses() {
                println!("  {address}");
            }
        }
        Err(err) if err.is_not_found() => println!("{postcode}: no addresses found"),
        Err(err) => return Err(err),
    }

    Ok(())
}
