// Quiz page 4 definition
// Longest sequence: five slots, so the answer box wraps on narrow screens.

pub static PAGE4_QUESTION: [&str; 5] = [
    "images/vehicle/bike.png",
    "images/vehicle/car.png",
    "images/vehicle/bus.png",
    "images/vehicle/train.png",
    "images/vehicle/plane.png",
];

pub static PAGE4_IMAGES: [&str; 7] = [
    "images/vehicle/plane.png",
    "images/vehicle/boat.png",
    "images/vehicle/bus.png",
    "images/vehicle/bike.png",
    "images/vehicle/rocket.png",
    "images/vehicle/train.png",
    "images/vehicle/car.png",
];
