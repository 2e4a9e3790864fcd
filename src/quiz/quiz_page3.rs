// Quiz page 3 definition

pub static PAGE3_QUESTION: [&str; 4] = [
    "images/shape/circle.png",
    "images/shape/square.png",
    "images/shape/triangle.png",
    "images/shape/star.png",
];

pub static PAGE3_IMAGES: [&str; 6] = [
    "images/shape/star.png",
    "images/shape/heart.png",
    "images/shape/triangle.png",
    "images/shape/circle.png",
    "images/shape/hexagon.png",
    "images/shape/square.png",
];
