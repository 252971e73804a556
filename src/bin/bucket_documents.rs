use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    arxiv_triplets::apps::run_bucket_documents(std::env::args().skip(1))
}
