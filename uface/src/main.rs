use std::path::{Path, PathBuf};

use clap::Parser;
use lbp::GrayImage;
use paillier::{KeyPair, PublicKey};
use sampling::Source;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use uface::{EncryptedDescriptor, EncryptionPipeline, IdentityToken, PipelineConfig, Recovered, recover};

#[derive(Parser, Debug)]
#[command(name = "uface", version, about = "Encrypted LBP face descriptors")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Args, Debug)]
struct GeometryArgs {
    /// JSON pipeline configuration (defaults to $UFACE_CONFIG, then built-in values)
    #[arg(long)]
    config: Option<PathBuf>,
    /// Image width, overrides the configuration
    #[arg(long)]
    width: Option<usize>,
    /// Image height, overrides the configuration
    #[arg(long)]
    height: Option<usize>,
    /// Number of grid cells (a perfect square), overrides the configuration
    #[arg(long)]
    grid_size: Option<usize>,
}

impl GeometryArgs {
    fn resolve(&self) -> uface::Result<PipelineConfig> {
        let mut config: PipelineConfig = match &self.config {
            Some(path) => PipelineConfig::from_file(path)?,
            None => PipelineConfig::from_env()?,
        };
        if let Some(width) = self.width {
            config.width = width;
        }
        if let Some(height) = self.height {
            config.height = height;
        }
        if let Some(grid_size) = self.grid_size {
            config.grid_size = grid_size;
        }
        config.validate()?;
        Ok(config)
    }
}

#[derive(clap::Subcommand, Debug)]
enum Command {
    /// Generate a Paillier key pair
    Keygen {
        /// Modulus size in bits
        #[arg(short, long, default_value_t = 2048)]
        bits: u32,
        /// Primality certainty: error probability at most 2^-certainty
        #[arg(long, default_value_t = 64)]
        certainty: u32,
        /// Output file for the public key line "n g bits"
        #[arg(long)]
        public: PathBuf,
        /// Output file for the private key line "lambda u"
        #[arg(long)]
        private: PathBuf,
    },
    /// Encrypt the descriptor of a PGM face crop
    Encrypt {
        /// Binary PGM (P5) face crop
        image: PathBuf,
        /// Public key file
        #[arg(short = 'k', long)]
        public_key: PathBuf,
        /// Decimal identity token
        #[arg(long, conflicts_with = "device")]
        token: Option<IdentityToken>,
        /// Device id, stamped with the current time to form the identity token
        #[arg(long)]
        device: Option<u64>,
        /// Output descriptor file
        #[arg(short, long)]
        output: PathBuf,
        #[command(flatten)]
        geometry: GeometryArgs,
    },
    /// Decrypt a descriptor with the issuer's key pair
    Recover {
        /// Descriptor file
        descriptor: PathBuf,
        /// Public key file
        #[arg(short = 'k', long)]
        public_key: PathBuf,
        /// Private key file
        #[arg(short = 'p', long)]
        private_key: PathBuf,
        #[command(flatten)]
        geometry: GeometryArgs,
    },
}

fn read_line(path: &Path) -> uface::Result<String> {
    Ok(std::fs::read_to_string(path)?.trim().to_string())
}

fn run(command: Command) -> uface::Result<()> {
    match command {
        Command::Keygen {
            bits,
            certainty,
            public,
            private,
        } => {
            let mut source: Source = Source::from_os()?;
            let keys: KeyPair = KeyPair::generate(bits, certainty, &mut source)?;
            std::fs::write(&public, format!("{}\n", keys.public()))?;
            std::fs::write(&private, format!("{}\n", keys.private()))?;
            tracing::info!(public = %public.display(), private = %private.display(), "wrote key pair");
        }
        Command::Encrypt {
            image,
            public_key,
            token,
            device,
            output,
            geometry,
        } => {
            let config: PipelineConfig = geometry.resolve()?;
            let public_key: PublicKey = read_line(&public_key)?.parse()?;
            let image: GrayImage = uface::pgm::load(&image)?;
            let token: IdentityToken = token.unwrap_or_else(|| IdentityToken::now(device.unwrap_or_default()));

            let mut source: Source = Source::from_os()?;
            let descriptor: EncryptedDescriptor =
                EncryptionPipeline::new(config)?.run(&image, &public_key, &token, &mut source)?;
            descriptor.write_to(&output)?;
        }
        Command::Recover {
            descriptor,
            public_key,
            private_key,
            geometry,
        } => {
            let config: PipelineConfig = geometry.resolve()?;
            let keys: KeyPair = KeyPair::parse(&read_line(&public_key)?, &read_line(&private_key)?)?;
            let descriptor: EncryptedDescriptor = EncryptedDescriptor::read_from(&descriptor)?;
            let recovered: Recovered = recover(&keys, &descriptor, &config)?;

            println!("{}", recovered.token);
            recovered.histogram.rows().for_each(|row| {
                let line: Vec<String> = row.iter().map(|count| count.to_string()).collect();
                println!("{}", line.join(" "));
            });
        }
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli: Cli = Cli::parse();
    if let Err(e) = run(cli.command) {
        tracing::error!(kind = %e.kind(), "{e}");
        return Err(anyhow::Error::from(e));
    }
    Ok(())
}
