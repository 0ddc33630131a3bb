// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{
    AvailabilitySlot, Candidate, ConnectionRecord, ConnectionStatus, DeliveryState, Facet,
    FilterState, Role, SessionType,
};
pub use requests::{
    AddSessionTypeRequest, AddSlotRequest, AttemptBookingRequest, ConnectionRequestBody,
    GestureRequest, RenameSessionTypeRequest, RespondRequestBody, SearchRequest, SettleRequest,
    StartBrowseRequest, ToggleFilterRequest,
};
pub use responses::{
    BookingResponse, CapacityResponse, ConnectionResponse, DeleteConfirmResponse,
    DeletePreviewResponse, ErrorResponse, GestureResponse, HealthResponse,
    RenameSessionTypeResponse, RespondResponse, SettleResponse, SlotListResponse,
    StackView, StartBrowseResponse,
};
