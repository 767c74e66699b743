//! Message catalog for response envelopes, grouped by feature then action.
//!
//! Only success messages live here; failures carry their text on the error.

pub mod auth {
    pub const SIGN_UP: &str = "Signed up successfully.";
    pub const SIGN_IN: &str = "Signed in successfully.";
    pub const REFRESH: &str = "Tokens refreshed.";
    pub const LOGOUT: &str = "Signed out successfully.";
}

pub mod user {
    pub const FIND_ME: &str = "Fetched your profile.";
    pub const UPDATE: &str = "Profile updated.";
    pub const DELETE: &str = "Account deleted.";
    pub const FIND_COMMUNITIES: &str = "Fetched your communities.";
}

pub mod community {
    pub const CREATE: &str = "Community created.";
    pub const FIND_ALL: &str = "Fetched all communities.";
    pub const FIND_ONE: &str = "Fetched the community.";
    pub const UPDATE: &str = "Community updated.";
    pub const REMOVE: &str = "Community deleted.";
    pub const JOIN: &str = "Joined the community.";
    pub const LEAVE: &str = "Left the community.";
    pub const FIND_ROLE: &str = "Resolved your role in the community.";
}

pub mod post {
    pub const CREATE: &str = "Post created.";
    pub const FIND_POSTS: &str = "Fetched posts.";
    pub const FIND_ARTIST_POSTS: &str = "Fetched the artist's posts.";
    pub const FIND_ONE: &str = "Fetched the post.";
    pub const UPDATE: &str = "Post updated.";
    pub const REMOVE: &str = "Post deleted.";
}

pub mod comment {
    pub const CREATE: &str = "Comment created.";
    pub const FIND_ALL: &str = "Fetched comments.";
    pub const UPDATE: &str = "Comment updated.";
    pub const REMOVE: &str = "Comment deleted.";
}

pub mod like {
    pub const UPDATE_STATUS: &str = "Like status updated.";
    pub const FIND_STATUS: &str = "Fetched like status.";
}

pub mod notice {
    pub const CREATE: &str = "Notice created.";
    pub const FIND_ALL: &str = "Fetched notices.";
    pub const FIND_ONE: &str = "Fetched the notice.";
    pub const UPDATE: &str = "Notice updated.";
    pub const REMOVE: &str = "Notice deleted.";
}

pub mod media {
    pub const CREATE: &str = "Media created.";
    pub const FIND_ALL: &str = "Fetched media.";
    pub const FIND_ONE: &str = "Fetched the media.";
    pub const UPDATE: &str = "Media updated.";
    pub const REMOVE: &str = "Media deleted.";
}

pub mod live {
    pub const CREATE: &str = "Live started.";
    pub const FIND_ALL: &str = "Fetched lives.";
    pub const FIND_ONE: &str = "Fetched the live.";
    pub const END: &str = "Live ended.";
}

pub mod admin {
    pub const GRANT_ARTIST: &str = "Artist registered.";
    pub const GRANT_MANAGER: &str = "Manager registered.";
    pub const REVOKE_ARTIST: &str = "Artist removed.";
    pub const REVOKE_MANAGER: &str = "Manager removed.";
    pub const FIND_STAFF: &str = "Fetched community staff.";
}

pub mod membership {
    pub const PAYMENT: &str = "Membership payment confirmed.";
    pub const FIND_ALL: &str = "Fetched your memberships.";
}

pub mod product {
    pub const CREATE_CATEGORY: &str = "Product category created.";
    pub const FIND_CATEGORIES: &str = "Fetched product categories.";
    pub const CREATE: &str = "Product created.";
    pub const FIND_ALL: &str = "Fetched products.";
}

pub mod merchandise {
    pub const CREATE: &str = "Merchandise created.";
    pub const FIND_ALL: &str = "Fetched merchandise.";
    pub const FIND_ONE: &str = "Fetched the merchandise.";
    pub const UPDATE: &str = "Merchandise updated.";
    pub const REMOVE: &str = "Merchandise deleted.";
}

pub mod cart {
    pub const FIND: &str = "Fetched your cart.";
    pub const ADD_ITEM: &str = "Added to cart.";
    pub const UPDATE_ITEM: &str = "Cart item updated.";
    pub const REMOVE_ITEM: &str = "Removed from cart.";
    pub const CHECKOUT: &str = "Order placed.";
}
