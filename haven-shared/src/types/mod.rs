mod actor;
mod article;
mod article_report;
mod bookmark;
mod comment;
mod favorite;
mod highlight;
mod notification;
mod rating;
mod reads_report;
mod target;
mod vote;
mod votes_count;

pub use actor::{Actor, ActorId, Profile};
pub use article::{slugify, Article, ArticleChanges, ArticleView, NewArticle};
pub use article_report::{ArticleReport, ArticleReportView};
pub use bookmark::{Bookmark, BookmarkView, BookmarkedArticle};
pub use comment::{Comment, CommentView, NewComment};
pub use favorite::{Favorite, FavoriteView};
pub use highlight::{
    HighlightChanges, HighlightToggle, HighlightView, HighlightedArticle, Highlight, NewHighlight,
};
pub use notification::{Notification, NotificationKind};
pub use rating::{round_average, Rating, RatingView, RATING_MAX, RATING_MIN};
pub use reads_report::{ReadArticle, ReadsReport, ReadsReportView};
pub use target::{Target, TargetKind};
pub use vote::{Vote, VoteTransition, VoteValue};
pub use votes_count::VotesCount;
