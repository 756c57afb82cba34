use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueHint};

#[derive(Debug, Parser)]
#[command(
    name = "trailpost-cli",
    version,
    about = "Read and edit a trailpost site from the command line"
)]
pub struct Cli {
    /// Base URL of the site, e.g. http://localhost:3000
    #[arg(long, env = "TRAILPOST_SITE_URL", global = true, value_hint = ValueHint::Url)]
    pub site: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Blog posts.
    Blogs {
        #[command(subcommand)]
        command: BlogCmd,
    },
    /// Reader comments.
    Comments {
        #[command(subcommand)]
        command: CommentCmd,
    },
    /// Tour guides.
    TourGuides {
        #[command(subcommand)]
        command: TourGuideCmd,
    },
}

#[derive(Debug, Subcommand)]
pub enum BlogCmd {
    /// List every blog, newest first.
    List,
    /// Show one blog.
    Get { slug: String },
    /// Change selected fields of a blog.
    Update(BlogUpdateArgs),
}

#[derive(Debug, Args)]
pub struct BlogUpdateArgs {
    pub slug: String,
    #[arg(long)]
    pub title: Option<String>,
    #[arg(long)]
    pub excerpt: Option<String>,
    /// Text file whose blank-line separated paragraphs replace the content.
    #[arg(long, value_hint = ValueHint::FilePath)]
    pub content_file: Option<PathBuf>,
    #[arg(long)]
    pub date: Option<String>,
    #[arg(long)]
    pub read_time: Option<String>,
    #[arg(long)]
    pub hero_image: Option<String>,
    #[arg(long)]
    pub category: Option<String>,
    #[arg(long)]
    pub quote: Option<String>,
    #[arg(long)]
    pub author_name: Option<String>,
    #[arg(long)]
    pub author_avatar: Option<String>,
    #[arg(long)]
    pub author_bio: Option<String>,
}

#[derive(Debug, Subcommand)]
pub enum CommentCmd {
    /// List the comments of one blog.
    List {
        #[arg(long = "blog")]
        blog_slug: String,
    },
    /// Post a comment.
    Add(CommentAddArgs),
}

#[derive(Debug, Args)]
pub struct CommentAddArgs {
    #[arg(long = "blog")]
    pub blog_slug: String,
    #[arg(long)]
    pub author: String,
    #[arg(long)]
    pub content: String,
    /// 1 to 5; the server stores 5 when omitted.
    #[arg(long, value_parser = clap::value_parser!(u8).range(1..=5))]
    pub rating: Option<u8>,
    #[arg(long)]
    pub email: Option<String>,
    #[arg(long)]
    pub avatar: Option<String>,
}

#[derive(Debug, Subcommand)]
pub enum TourGuideCmd {
    /// List every tour guide.
    List,
}
