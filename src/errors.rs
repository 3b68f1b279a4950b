use std::io;
use serde_json;
use time;
use xdg;

error_chain! {
    foreign_links {
        Io(io::Error);
        Json(serde_json::Error);
        Xdg(xdg::BaseDirectoriesError);
        TimeFmt(time::ParseError);
    }

    errors {
        IndexOutOfRange(index: i64, len: usize) {
            description("Invalid book index")
            display("No book at index `{}` (there are {} book(s))", index, len)
        }
        InvalidRating(rating: i64) {
            description("Ratings must be integers between 1 and 5")
            display("Rating `{}` is not an integer between 1 and 5", rating)
        }
        InvalidRecord(index: usize) {
            description("Book record breaks an invariant")
            display("Book at index `{}` is invalid", index)
        }
        InvalidTimestamp(sec: i64, nsec: i32) {
            description("Timestamp out of range")
            display("Timestamp {}s {}ns is out of range", sec, nsec)
        }
        MalformedCommand(hint: String) {
            description("Malformed command syntax")
            display("Invalid command syntax: {}", hint)
        }
        Deserialization(path: String) {
            description("Could not read book list")
            display("Book list at `{}` is malformed", path)
        }
        Serialization(path: String) {
            description("Could not write book list")
            display("Could not serialize book list for `{}`", path)
        }
    }
}
