//! Domain entities - the core business objects.

mod category;
mod page;
mod post;
mod user;

pub use category::{Category, CategoryChanges, CategoryId, CategorySummary, NewCategory};
pub use page::{PageRequest, Paginated};
pub use post::{NewPost, Post, PostChanges, PostId, PostWithRelations};
pub use user::{AuthorSummary, User, UserId};
