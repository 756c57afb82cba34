use trailpost_api_types::{AuthorPatch, CreateCommentRequest, UpdateBlogRequest};

use crate::api::BlogApi;
use crate::client::ApiClient;

use super::CliError;
use super::args::{
    BlogCmd, BlogUpdateArgs, Cli, CommentAddArgs, CommentCmd, Commands, TourGuideCmd,
};
use super::paragraphs;
use super::print::print_json;

pub async fn run(cli: Cli) -> Result<(), CliError> {
    let site = cli.site.ok_or(CliError::MissingSite)?;
    let api = BlogApi::new(ApiClient::new(&site)?);

    match cli.command {
        Commands::Blogs { command } => handle_blogs(&api, command).await,
        Commands::Comments { command } => handle_comments(&api, command).await,
        Commands::TourGuides { command } => handle_tour_guides(&api, command).await,
    }
}

async fn handle_blogs(api: &BlogApi, command: BlogCmd) -> Result<(), CliError> {
    match command {
        BlogCmd::List => print_json(&api.blogs().await?),
        BlogCmd::Get { slug } => print_json(&api.blog_by_slug(&slug).await?),
        BlogCmd::Update(args) => {
            let slug = args.slug.clone();
            let request = build_update(args).await?;
            print_json(&api.update_blog(&slug, &request).await?)
        }
    }
}

async fn handle_comments(api: &BlogApi, command: CommentCmd) -> Result<(), CliError> {
    match command {
        CommentCmd::List { blog_slug } => print_json(&api.comments_by_blog(&blog_slug).await?),
        CommentCmd::Add(args) => print_json(&api.add_comment(&build_comment(args)).await?),
    }
}

async fn handle_tour_guides(api: &BlogApi, command: TourGuideCmd) -> Result<(), CliError> {
    match command {
        TourGuideCmd::List => print_json(&api.tour_guides().await?),
    }
}

async fn build_update(args: BlogUpdateArgs) -> Result<UpdateBlogRequest, CliError> {
    let content = match args.content_file {
        Some(path) => {
            let text = tokio::fs::read_to_string(&path)
                .await
                .map_err(|source| CliError::InputFile {
                    path: path.clone(),
                    source,
                })?;
            let content = paragraphs::split(&text);
            if content.is_empty() {
                return Err(CliError::InvalidInput(format!(
                    "{} contains no paragraphs",
                    path.display()
                )));
            }
            Some(content)
        }
        None => None,
    };

    let author = AuthorPatch {
        name: args.author_name,
        avatar: args.author_avatar,
        bio: args.author_bio,
    };
    let author = (author != AuthorPatch::default()).then_some(author);

    let request = UpdateBlogRequest {
        slug: None,
        title: args.title,
        excerpt: args.excerpt,
        content,
        author,
        date: args.date,
        read_time: args.read_time,
        hero_image: args.hero_image,
        category: args.category,
        quote: args.quote,
    };

    if request == UpdateBlogRequest::default() {
        return Err(CliError::InvalidInput(
            "no fields to update; pass at least one field flag".to_string(),
        ));
    }
    Ok(request)
}

fn build_comment(args: CommentAddArgs) -> CreateCommentRequest {
    let mut request = CreateCommentRequest::new(args.blog_slug, args.author, args.content);
    if let Some(rating) = args.rating {
        request = request.with_rating(rating);
    }
    if let Some(email) = args.email {
        request = request.with_email(email);
    }
    request.avatar = args.avatar;
    request
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    fn update_args(slug: &str) -> BlogUpdateArgs {
        BlogUpdateArgs {
            slug: slug.to_string(),
            title: None,
            excerpt: None,
            content_file: None,
            date: None,
            read_time: None,
            hero_image: None,
            category: None,
            quote: None,
            author_name: None,
            author_avatar: None,
            author_bio: None,
        }
    }

    #[tokio::test]
    async fn empty_update_is_refused() {
        let err = build_update(update_args("kyoto"))
            .await
            .expect_err("nothing to send");
        assert!(matches!(err, CliError::InvalidInput(_)));
    }

    #[tokio::test]
    async fn content_file_becomes_paragraphs() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        write!(file, "One.\n\nTwo\nlines.\n").expect("write");

        let mut args = update_args("kyoto");
        args.content_file = Some(file.path().to_path_buf());
        let request = build_update(args).await.expect("request");

        assert_eq!(
            request.content,
            Some(vec!["One.".to_string(), "Two lines.".to_string()])
        );
        assert_eq!(request.author, None);
    }

    #[tokio::test]
    async fn missing_content_file_names_the_path() {
        let mut args = update_args("kyoto");
        args.content_file = Some("/nonexistent/post.txt".into());
        let err = build_update(args).await.expect_err("missing file");
        assert!(err.to_string().contains("/nonexistent/post.txt"));
    }

    #[tokio::test]
    async fn author_flags_build_a_partial_patch() {
        let mut args = update_args("kyoto");
        args.author_bio = Some("Writer".to_string());
        let request = build_update(args).await.expect("request");

        assert_eq!(
            request.author,
            Some(AuthorPatch {
                bio: Some("Writer".to_string()),
                ..Default::default()
            })
        );
        assert_eq!(request.slug, None);
    }

    #[test]
    fn comment_rating_is_sent_only_when_given() {
        let args = CommentAddArgs {
            blog_slug: "x".into(),
            author: "Jo".into(),
            content: "Great read".into(),
            rating: None,
            email: None,
            avatar: None,
        };
        let request = build_comment(args);
        assert_eq!(request.rating, None);
        assert_eq!(request.blog_slug.as_deref(), Some("x"));
    }
}
