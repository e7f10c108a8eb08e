use crate::core::helpers::hash_password;
use crate::models::models::{Comment, FollowEdge, Post, User};

/// Demo fixture the service boots with. The follower/following counters
/// below must stay consistent with the edge list at the bottom; tests
/// assert that law over every mutation.
pub struct SeedData {
    pub users: Vec<User>,
    pub posts: Vec<Post>,
    pub comments: Vec<Comment>,
    pub follows: Vec<FollowEdge>,
}

fn user(
    id: &str,
    username: &str,
    fullname: &str,
    email: &str,
    picture: &str,
    bio: &str,
    follower_count: u32,
    following_count: u32,
) -> anyhow::Result<User> {
    Ok(User {
        id: id.to_string(),
        username: username.to_string(),
        fullname: fullname.to_string(),
        email: email.to_string(),
        profile_picture: picture.to_string(),
        bio: bio.to_string(),
        password: hash_password("password123")?,
        follower_count,
        following_count,
    })
}

fn post(id: &str, user_id: &str, image: &str, caption: &str, like_count: u32, comments: &[&str], created_at: i64) -> Post {
    Post {
        id: id.to_string(),
        user_id: user_id.to_string(),
        image: image.to_string(),
        caption: caption.to_string(),
        like_count,
        liked_by_current_user: false,
        comments: comments.iter().map(|c| c.to_string()).collect(),
        created_at,
    }
}

fn comment(id: &str, post_id: &str, user_id: &str, content: &str, created_at: i64) -> Comment {
    Comment {
        id: id.to_string(),
        post_id: post_id.to_string(),
        user_id: user_id.to_string(),
        content: content.to_string(),
        created_at,
    }
}

fn edge(follower_id: &str, following_id: &str) -> FollowEdge {
    FollowEdge {
        follower_id: follower_id.to_string(),
        following_id: following_id.to_string(),
    }
}

pub fn demo_data() -> anyhow::Result<SeedData> {
    let users = vec![
        user(
            "1",
            "johndoe",
            "John Doe",
            "john@example.com",
            "https://i.pravatar.cc/150?img=1",
            "Photographer | Traveler | Food Lover",
            2,
            1,
        )?,
        user(
            "2",
            "janedoe",
            "Jane Doe",
            "jane@example.com",
            "https://i.pravatar.cc/150?img=5",
            "Digital Nomad | Adventure Seeker",
            1,
            2,
        )?,
        user(
            "3",
            "alex_smith",
            "Alex Smith",
            "alex@example.com",
            "https://i.pravatar.cc/150?img=8",
            "Web Developer | Coffee Enthusiast",
            1,
            1,
        )?,
    ];

    let posts = vec![
        post(
            "1",
            "1",
            "https://picsum.photos/id/237/600/600",
            "My awesome dog! 🐕 #dogsofinstagram",
            2,
            &["1", "2"],
            1_680_667_200_000,
        ),
        post(
            "2",
            "1",
            "https://picsum.photos/id/25/600/600",
            "Beautiful sunset at the beach 🌅 #sunset #beach",
            1,
            &["3"],
            1_681_099_200_000,
        ),
        post(
            "3",
            "2",
            "https://picsum.photos/id/102/600/600",
            "Morning hike with amazing views 🏔️ #hiking #nature",
            2,
            &["4"],
            1_681_531_200_000,
        ),
        post(
            "4",
            "3",
            "https://picsum.photos/id/1005/600/600",
            "Working on a new project! #coding #webdev",
            1,
            &[],
            1_681_790_400_000,
        ),
        post(
            "5",
            "3",
            "https://picsum.photos/id/1006/600/600",
            "Coffee time ☕ #coffee #worklife",
            1,
            &["5"],
            1_681_963_200_000,
        ),
    ];

    let comments = vec![
        comment("1", "1", "2", "So cute! 😍", 1_714_983_000_000),
        comment("2", "1", "3", "What breed is he?", 1_714_986_600_000),
        comment("3", "2", "2", "Gorgeous view!", 1_715_023_700_000),
        comment("4", "3", "1", "Looks amazing! Where is this?", 1_715_677_200_000),
        comment(
            "5",
            "5",
            "2",
            "Nothing better than a good cup of coffee!",
            1_715_850_600_000,
        ),
    ];

    let follows = vec![edge("1", "2"), edge("2", "1"), edge("2", "3"), edge("3", "1")];

    Ok(SeedData {
        users,
        posts,
        comments,
        follows,
    })
}
