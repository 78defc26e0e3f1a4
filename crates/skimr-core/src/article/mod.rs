mod extractor;

pub use extractor::{
    is_valid_url, title_from_url, ArticleExtractor, ExtractedArticle, HttpArticleExtractor,
    MAX_TITLE_CHARS,
};
