mod comments;
mod slots;
