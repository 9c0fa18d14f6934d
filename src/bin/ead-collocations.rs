use std::error::Error;

use ead_collocations::app::run_harvest;

fn main() -> Result<(), Box<dyn Error>> {
    run_harvest(std::env::args().skip(1))
}
