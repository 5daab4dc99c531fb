use std::path::PathBuf;

use clap::Parser;

/// Downloads data from the ACE sequencing portal.
///
/// Without `-j`, discovered job ids are listed and nothing is downloaded.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Your ACE sequencing portal username.
    ///
    /// The password is read from the ACEPASSWORD environment variable when
    /// set, otherwise from a masked interactive prompt.
    #[arg(short = 'u', long = "username")]
    pub username: String,

    /// Job ids to download.
    #[arg(short = 'j', long = "jobs", num_args = 1.., value_name = "JOB_ID")]
    pub jobs: Vec<String>,

    /// Force overwrite of an existing ace_sequencing directory.
    #[arg(short = 'f', long = "force", default_value_t = false)]
    pub force: bool,

    /// Directory under which the ace_sequencing tree is created.
    #[arg(short = 'o', long, value_name = "DIR", default_value = ".")]
    pub output_dir: PathBuf,

    /// Base URL of the SSO portal.
    #[arg(long, value_name = "URL")]
    pub sso_url: Option<String>,

    /// Base URL of the data host.
    #[arg(long, value_name = "URL")]
    pub data_url: Option<String>,

    /// Connect timeout in seconds. Fractions are supported.
    #[arg(long, default_value_t = 30.0, value_name = "Seconds")]
    pub connect_timeout: f32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn username_is_required() {
        assert!(Args::try_parse_from(["ace-seq-dl"]).is_err());
        let args = Args::try_parse_from(["ace-seq-dl", "-u", "alice"]).unwrap();
        assert_eq!(args.username, "alice");
        assert!(args.jobs.is_empty());
        assert!(!args.force);
    }

    #[test]
    fn jobs_flag_takes_multiple_ids() {
        let args = Args::try_parse_from(["ace-seq-dl", "-u", "alice", "-j", "J1", "J2", "-f"])
            .unwrap();
        assert_eq!(args.jobs, ["J1", "J2"]);
        assert!(args.force);
    }
}
