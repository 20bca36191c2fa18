use warp::filters::BoxedFilter;
use warp::{path, Filter};

use crate::api::image::ImageQuery;

fn path_prefix() -> BoxedFilter<()> {
    path!("image" / ..).boxed()
}

pub fn image() -> BoxedFilter<(ImageQuery,)> {
    warp::get()
        .and(path_prefix())
        .and(warp::path::end())
        .and(warp::query::<ImageQuery>())
        .boxed()
}
