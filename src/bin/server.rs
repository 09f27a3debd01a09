use clap::Parser;
use minidis::codec::DEFAULT_MAX_FRAME_SIZE;
use minidis::server::{self, Config, DEFAULT_HOST, DEFAULT_PORT};
use minidis::Error;

#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// The address to listen on
    #[arg(long, env = "MINIDIS_HOST", default_value = DEFAULT_HOST)]
    host: String,

    /// The port to listen on
    #[arg(short, long, env = "MINIDIS_PORT", default_value_t = DEFAULT_PORT)]
    port: u16,

    /// Largest request, in bytes, accepted from a client
    #[arg(long, env = "MAX_FRAME_SIZE", default_value_t = DEFAULT_MAX_FRAME_SIZE)]
    max_frame_size: usize,
}

impl From<Args> for Config {
    fn from(args: Args) -> Self {
        Config {
            host: args.host,
            port: args.port,
            max_frame_size: args.max_frame_size,
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    let args = Args::parse();

    server::run(args.into()).await
}
