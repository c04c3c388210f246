use std::{env, fs, path::PathBuf};

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-env-changed=OUT_DIR");

    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());
    let completions_dir = out_dir.join("completions");

    fs::create_dir_all(&completions_dir).unwrap();

    let mut cmd = clap::Command::new("siterate")
        .version(env!("CARGO_PKG_VERSION"))
        .author("Siterate Contributors")
        .about("Rate the design, SEO and content quality of a web page")
        .arg(clap::arg!(<INPUT> "URL to analyze, local HTML file, or '-' for stdin"))
        .arg(
            clap::arg!(-o --output <FILE> "Output file (default: stdout)")
                .value_name("FILE")
                .value_parser(clap::value_parser!(std::path::PathBuf)),
        )
        .arg(
            clap::arg!(-f --format <FORMAT> "Output format (text, json)")
                .value_name("FORMAT")
                .default_value("text")
                .value_parser(["text", "json"]),
        )
        .arg(
            clap::arg!(-m --mode <MODE> "Tone of the AI judgment (professional, roast)")
                .value_name("MODE")
                .default_value("professional")
                .value_parser(["professional", "roast"]),
        )
        .arg(clap::arg!(--ai "Also score the page with the OpenAI judge (needs OPENAI_API_KEY)"))
        .arg(clap::arg!(--check_links "Check the first outbound links and report their status"))
        .arg(clap::arg!(--url <URL> "Source URL to report for file or stdin input").value_name("URL"))
        .arg(clap::arg!(--timeout <SECS> "HTTP timeout in seconds").default_value("10"))
        .arg(clap::arg!(--user_agent <UA> "Custom User-Agent for HTTP requests").value_name("UA"))
        .arg(clap::arg!(--no_issues "Hide per-category issue lists in text output"))
        .arg(clap::arg!(-v --verbose "Enable debug logging"));

    clap_complete::generate_to(clap_complete::shells::Bash, &mut cmd, "siterate", &completions_dir).unwrap();
    clap_complete::generate_to(clap_complete::shells::Zsh, &mut cmd, "siterate", &completions_dir).unwrap();
    clap_complete::generate_to(clap_complete::shells::Fish, &mut cmd, "siterate", &completions_dir).unwrap();
    clap_complete::generate_to(clap_complete::shells::PowerShell, &mut cmd, "siterate", &completions_dir).unwrap();

    println!(
        "cargo:warning=Shell completions generated in: {}",
        completions_dir.display()
    );
}
