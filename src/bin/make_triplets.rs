use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    arxiv_triplets::apps::run_make_triplets(std::env::args().skip(1))
}
