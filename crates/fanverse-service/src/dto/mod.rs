//! Data transfer objects for API requests and responses
//!
//! - Request DTOs with validation for API inputs
//! - Response DTOs and the success envelope
//! - Mappers from domain entities to responses

pub mod mappers;
pub mod requests;
pub mod responses;

pub use requests::{
    AddCartItemRequest, CommentListQuery, CommentRequest, CommunityIdQuery, CommunityQuery,
    CreateCategoryRequest, CreateCommunityRequest, CreateLiveRequest, CreateMediaRequest,
    CreateMerchandiseRequest, CreateNoticeRequest, CreatePostRequest, CreateProductRequest,
    GrantStaffRequest, JoinCommunityRequest, LogoutRequest, MembershipPaymentRequest,
    MerchandiseOptionInput, PostIdQuery, PostListQuery, RefreshTokenRequest, SignInRequest,
    SignUpRequest, UpdateCartItemRequest, UpdateCommunityRequest, UpdateLikeRequest,
    UpdateMediaRequest, UpdateMerchandiseRequest, UpdateNoticeRequest, UpdatePostRequest,
    UpdateUserRequest,
};

pub use responses::{
    AuthResponse, CartLineResponse, CartResponse, CategoryResponse, CheckoutResponse,
    CommentResponse, CommunityResponse, CommunityRoleResponse, CommunityUserResponse, Envelope,
    HealthChecks, HealthResponse, JoinedCommunityResponse, LikeResponse, LikeStatusResponse,
    LiveResponse, MediaResponse, MembershipResponse, MerchandiseOptionResponse,
    MerchandiseResponse, NoticeResponse, PostResponse, ProductResponse, ReadinessResponse,
    StaffResponse, UserResponse,
};

pub use mappers::PostWithDetails;
