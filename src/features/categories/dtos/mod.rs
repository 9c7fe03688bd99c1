pub mod category_dto;

pub use category_dto::{
    AdminCategoryDto, AdminCategoryQuery, BulkActionResultDto, BulkSelectionDto,
    CategoryDetailDto, CategoryResponseDto, CategoryTreeDto, CreateCategoryDto,
    ListCategoriesQuery, UpdateCategoryDto,
};
