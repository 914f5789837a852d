pub mod author_dto;

pub use author_dto::{
    AuthorResponseDto, CreateAuthorDto, DeleteAuthorResponseDto, UpdateAuthorDto,
};
