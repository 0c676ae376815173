use std::collections::{BTreeMap, BTreeSet};
use std::path::PathBuf;

use clap::Parser;
use log::info;

use scvcore::algorithm::coverage::coverage_report;
use scvcore::annotation::extract::extract;
use scvcore::annotation::grammar::{PtmToken, TokenPatterns};
use scvcore::annotation::reconcile::{AnnotationSink, TokenRegistry};
use scvcore::annotation::resolve::resolve_colors;
use scvcore::data::color::{pack_rgb, parse_hex, Rgb};
use scvcore::data::fasta::{parse_fasta, read_fasta};
use scvcore::data::job::Job;

/// Run grouped PSM input against a reference proteome and print the
/// per-protein coverage report as JSON.
#[derive(Parser, Debug)]
#[command(name = "scvcore", version, about)]
struct Args {
    /// FASTA file with the reference proteome (built-in demo proteome when omitted)
    #[arg(long)]
    fasta: Option<PathBuf>,
    /// text file with PSM lines and {...}[label] blocks (built-in demo input when omitted)
    #[arg(long)]
    psms: Option<PathBuf>,
    /// viewer background color
    #[arg(long, default_value = "#ffffff")]
    background: String,
    #[arg(long, default_value = "mouse")]
    species: String,
}

const DEMO_PSMS: &str = "{EQNEASPTPR
YCQEQDMCCR
ELAPGLHLR
GVVSDNCYPFSGR
C[143]TCHEGGHWECDQEPCLVDPDMIK}[group1]
GRADECALPYLGATCYCDLFCN[115]R
GTNECDIETFVLGVWGR
EQNEASPTPR
GNYGWQAGN[115]HSAFWGMTLDEGIR
CPNGQVDSNDIYQVTPAYR
DLSWQVRSLLLDHNR
CNCALRPLCTWLR
RPGSRNRPGYGTGYF
RPDGDAASQPRTPILLLR
QSLRQELYVQDYASIDWPAQR
GTNGSQIWDTSFAIQALLEAGAHHR
ETLNQGLDFCRRKQR
SYFTDLPKAQTAHEGALN[115]GVTFYAK
CDGEANVFSDLHSLRQFTSR
ETFHGLKELAFSYLVWDSK
IKNIYVSDVLNMK";

const DEMO_FASTA: &str = ">sp|P0DEM1|DEMO1_MOUSE Demo coverage protein one OS=Mus musculus OX=10090 GN=Dem1 PE=1 SV=1
EQNEASPTPRYCQEQDMCCRELAPGLHLRGVVSDNCYPFSGRCTCHEGGHWECDQEPCLV
DPDMIKGRADECALPYLGATCYCDLFCNRGTNECDIETFVLGVWGRTTTTTTTTTT
>sp|P0DEM2|DEMO2_MOUSE Demo coverage protein two OS=Mus musculus OX=10090 GN=Dem2 PE=1 SV=1
GNYGWQAGNHSAFWGMTLDEGIRCPNGQVDSNDIYQVTPAYRDLSWQVRSLLLDHNRSYF
TDLPKAQTAHEGALNGVTFYAKCDGEANVFSDLHSLRQFTSRETFHGLKELAFSYLVWDS
KIKNIYVSDVLNMKGGGGGGGGGGGGGGGGGGGG";

struct LoggingSink;

impl AnnotationSink for LoggingSink {
    fn on_token_added(&mut self, token: &PtmToken) {
        info!("annotation card added: {} (id {})", token, token.card_id());
    }
    fn on_token_removed(&mut self, token: &PtmToken) {
        info!("annotation card removed: {}", token);
    }
}

fn demo_colors() -> BTreeMap<String, Rgb> {
    let mut colors = BTreeMap::new();
    colors.insert("C[143]".to_string(), [255, 0, 247]);
    colors.insert("N[115]".to_string(), [0, 255, 8]);
    colors
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args = Args::parse();
    let patterns = TokenPatterns::new();

    let psm_text = match &args.psms {
        Some(path) => std::fs::read_to_string(path)?,
        None => DEMO_PSMS.to_string(),
    };
    let extraction = extract(&patterns, &psm_text);
    info!(
        "extracted {} group(s) and {} token(s)",
        extraction.groups.len(),
        extraction.tokens.len()
    );

    let mut registry = TokenRegistry::new();
    registry.reconcile(&extraction.tokens, &mut LoggingSink);

    // annotate every known token, demo colors where assigned
    let selected: BTreeSet<String> = registry
        .tokens()
        .iter()
        .map(|token| token.as_str().to_string())
        .collect();
    let colors = demo_colors();
    let resolved = resolve_colors(&patterns, &selected, |token| {
        colors.get(token).copied().unwrap_or([255, 0, 0])
    });

    let background = pack_rgb(parse_hex(&args.background)?);
    let job = Job::new(extraction.groups, resolved, background, args.species);
    job.validate()?;

    let table = match &args.fasta {
        Some(path) => read_fasta(path)?,
        None => parse_fasta(DEMO_FASTA)?,
    };
    let report = coverage_report(&patterns, &job, &table);
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
