pub mod post;

use rocket::Route;

pub fn post_routes() -> Vec<Route> {
    routes![
        post::create_post,
        post::get_posts,
        post::get_post,
        post::update_post,
        post::delete_post,
    ]
}
