pub mod course_dto;

pub use course_dto::{
    CourseQueryParams, CourseResponseDto, CourseSortBy, CourseStatsDto, CreateCourseDto,
    DeleteCourseResponseDto, RecordReviewDto, SortDirection, UpdateCourseDto,
};
